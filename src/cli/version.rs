//! Version command handler

use crate::provider::RadarrProvider;
use crate::resources;

/// Display version information
pub fn display_version() {
    println!("radarr-provider {}", env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("  License: {}", env!("CARGO_PKG_LICENSE"));
    println!("  Provider type: {}", RadarrProvider::TYPE_NAME);
    println!("  Resource types: {}", resources::all().len());
}
