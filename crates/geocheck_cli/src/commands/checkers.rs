use anyhow::Result;
use geocheck_validator::default_checkers;

use crate::output;

pub fn execute(format: &str) -> Result<()> {
    output::print_checkers(&default_checkers(), format)
}
