use crate::error::{ChartError, ChartResult};

pub(super) fn validate_widget_size(
    width_px: f64,
    chart_height_px: f64,
    minimap_height_px: f64,
) -> ChartResult<()> {
    let positive = |value: f64| value.is_finite() && value > 0.0;
    if !positive(width_px) || !positive(chart_height_px) {
        return Err(ChartError::InvalidViewport {
            width: width_px,
            height: chart_height_px,
        });
    }
    if !positive(minimap_height_px) {
        return Err(ChartError::InvalidViewport {
            width: width_px,
            height: minimap_height_px,
        });
    }
    Ok(())
}

pub(super) fn validate_fraction(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(ChartError::InvalidData(format!("{name} must be in (0, 1]")));
    }
    Ok(())
}

pub(super) fn validate_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

pub(super) fn validate_pointer_x(local_x: f64) -> ChartResult<()> {
    if !local_x.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
