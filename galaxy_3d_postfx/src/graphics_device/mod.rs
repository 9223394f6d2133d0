/// Graphics device module - backend contract consumed by the framework

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod program;
pub mod command_list;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use program::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
