pub mod auth;
pub mod city;
pub mod contact;
pub mod health;
pub mod program;
pub mod public;
pub mod session;
pub mod share;
pub mod venue;
