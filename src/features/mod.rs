pub mod libcal;
pub mod proxy;
pub mod room_meta;
