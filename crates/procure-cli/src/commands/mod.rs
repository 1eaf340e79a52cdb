pub mod forecast;
pub mod inventory;
pub mod optimize;
pub mod recommend;
pub mod seed;
