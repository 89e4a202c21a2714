pub mod editor;
pub mod listing;
pub mod paginate;
pub mod preview;
pub mod protect;
pub mod sandbox;
