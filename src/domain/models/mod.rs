pub mod city;
pub mod contact;
pub mod program;
pub mod session;
pub mod venue;
