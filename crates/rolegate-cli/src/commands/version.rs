//! Version information.

use crate::style::colors::SemanticStyle;

pub fn run() {
    println!(
        "{} {}",
        "rolegate".header(),
        env!("CARGO_PKG_VERSION")
    );
}
