pub mod args;
pub mod check;
pub mod cluster;
pub mod config;
pub mod dns;
pub mod http;
pub mod netns;
pub mod os;
pub mod packet;
pub mod pmtu;
pub mod probe;
