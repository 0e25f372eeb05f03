// Remix Page: session state, its collaborators, and a plain-text rendering.

pub mod client;
pub mod clipboard;
pub mod session;
pub mod view;
