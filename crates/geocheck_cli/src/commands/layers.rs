use anyhow::Result;
use geocheck_cad::layer_requirements;

use crate::output;

pub fn execute(format: &str) -> Result<()> {
    output::print_layer_requirements(&layer_requirements(), format)
}
