pub mod calculation;
pub mod chat;
pub mod element;
pub mod formula;
pub mod material;
