pub mod align;
pub mod animator;
pub mod contour;
pub mod interpolate;
pub mod resample;
