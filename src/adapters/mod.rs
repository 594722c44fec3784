// Adapters layer: concrete implementations for external collaborators.

pub mod memory;

pub use memory::InMemoryBookingService;
