pub mod characters;
pub mod kinds;
pub mod rankings;
