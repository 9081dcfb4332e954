//! Built-in package recipes.

pub mod lightning_kokkos;

pub use lightning_kokkos::lightning_kokkos;
