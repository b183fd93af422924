/// State management module
///
/// This module handles all application state, including:
/// - Durable local storage and the port trait over it (storage.rs)
/// - The favorites list (favorites.rs)
/// - The login session flag (session.rs)
/// - Search filter composition and result state (search.rs)

pub mod favorites;
pub mod search;
pub mod session;
pub mod storage;
