use tracing::info;

use crate::{chart::Chart, error::Result};

/// Where finished charts are presented. Charts are never written to disk.
pub trait ChartSurface {
    fn present(&mut self, chart: Chart) -> Result<()>;
}

impl<S: ChartSurface + ?Sized> ChartSurface for &mut S {
    fn present(&mut self, chart: Chart) -> Result<()> {
        (**self).present(chart)
    }
}

impl<S: ChartSurface + ?Sized> ChartSurface for Box<S> {
    fn present(&mut self, chart: Chart) -> Result<()> {
        (**self).present(chart)
    }
}

/// Opens each chart in the default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct Browser;

impl ChartSurface for Browser {
    fn present(&mut self, chart: Chart) -> Result<()> {
        info!(kind = %chart.kind, title = %chart.title, "showing chart");
        chart.plot.show();
        Ok(())
    }
}

/// Logs each chart instead of displaying it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl ChartSurface for Headless {
    fn present(&mut self, chart: Chart) -> Result<()> {
        info!(kind = %chart.kind, title = %chart.title, "chart rendered headless");
        Ok(())
    }
}
