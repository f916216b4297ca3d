//! # Server-Rendered Pages
//!
//! Each page is a pure function from fetched content to [`maud::Markup`].
//! Handlers in [`crate::routes`] fetch, then call one of these.
//!
//! ```text
//! ┌──────────┬───────────────────────────┬─────────────────────────────────┐
//! │ Page     │ Input                     │ States                          │
//! ├──────────┼───────────────────────────┼─────────────────────────────────┤
//! │ home     │ HomepageContent, Carousel │ slides / empty                  │
//! │ menu     │ Fetched<Product>, ?cat    │ records / samples / error       │
//! │ blog     │ Fetched<Post>             │ records / samples / error       │
//! │ post     │ Post                      │ found / 404 page                │
//! │ about    │ Option<Page>              │ CMS page / built-in story       │
//! │ contact  │ ContactView               │ blank / invalid / sent / failed │
//! └──────────┴───────────────────────────┴─────────────────────────────────┘
//! ```

pub mod about;
pub mod blog;
pub mod contact;
pub mod home;
pub mod layout;
pub mod menu;

pub use contact::ContactView;
pub use layout::{Nav, PageContext};
