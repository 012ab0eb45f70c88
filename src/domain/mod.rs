pub mod auth;
pub mod cart;
pub mod catalog;
pub mod comment;
pub mod courier;
pub mod customer;
pub mod delivery;
pub mod order;
pub mod promotion;
