//! Analysis of source rasters and of particle progress

/// Feature scoring of raster cells
pub mod features;
/// Progress statistics and observers
pub mod statistics;
