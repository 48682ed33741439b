use super::{find_block, find_blocks, unquote};
use crate::core::MatrixAxis;
use once_cell::sync::Lazy;
use regex::Regex;

static AXIS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name\s+['"]([^'"]+)['"]"#).unwrap());

static AXIS_VALUES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"values\s+([^\n]+)").unwrap());

/// Extracts matrix axes from a `matrix { axes { axis { ... } } }` block.
/// Axis order and value order both follow declaration order.
pub fn extract(script: &str) -> Vec<MatrixAxis> {
    let Some(matrix) = find_block(script, "matrix") else {
        return Vec::new();
    };
    let Some(axes) = find_block(matrix.body, "axes") else {
        return Vec::new();
    };

    find_blocks(axes.body, "axis")
        .into_iter()
        .filter_map(|axis| {
            let name = AXIS_NAME.captures(axis.body)?.get(1)?.as_str().to_string();
            let values = AXIS_VALUES
                .captures(axis.body)?
                .get(1)?
                .as_str()
                .split(',')
                .map(|v| unquote(v).to_string())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>();
            if values.is_empty() {
                return None;
            }
            Some(MatrixAxis { name, values })
        })
        .collect()
}
