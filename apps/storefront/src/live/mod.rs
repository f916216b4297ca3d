//! Live page behaviour over WebSocket.
//!
//! - [`carousel`] - `CarouselController`, the timer actor behind the featured carousel
//! - [`session`] - `/live/carousel` socket handler, one controller per socket

pub mod carousel;
pub mod session;

pub use carousel::{CarouselController, CarouselError, CarouselResult};
pub use session::{carousel_socket, ClientCommand};
