use winit::dpi::{LogicalPosition, LogicalSize};
use winit::monitor::MonitorHandle;

/// Top-left position that centers a `window`-sized rect on `monitor`.
///
/// Windows larger than the monitor are pinned to the origin.
pub(super) fn centered_origin(
    monitor: LogicalSize<f64>,
    window: LogicalSize<f64>,
) -> LogicalPosition<f64> {
    let x = ((monitor.width - window.width) / 2.0).max(0.0);
    let y = ((monitor.height - window.height) / 2.0).max(0.0);
    LogicalPosition::new(x.floor(), y.floor())
}

pub(super) fn centered_on(
    monitor: &MonitorHandle,
    window: LogicalSize<f64>,
) -> LogicalPosition<f64> {
    let size: LogicalSize<f64> = monitor.size().to_logical(monitor.scale_factor());
    centered_origin(size, window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_smaller_window() {
        let p = centered_origin(LogicalSize::new(1920.0, 1080.0), LogicalSize::new(800.0, 600.0));
        assert_eq!(p, LogicalPosition::new(560.0, 240.0));
    }

    #[test]
    fn odd_remainder_rounds_down() {
        let p = centered_origin(LogicalSize::new(1001.0, 701.0), LogicalSize::new(800.0, 600.0));
        assert_eq!(p, LogicalPosition::new(100.0, 50.0));
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let p = centered_origin(LogicalSize::new(640.0, 480.0), LogicalSize::new(800.0, 600.0));
        assert_eq!(p, LogicalPosition::new(0.0, 0.0));
    }
}
