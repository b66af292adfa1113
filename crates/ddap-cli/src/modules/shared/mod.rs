pub(crate) mod http;
mod poll;
mod render;

pub(crate) use poll::{poll_until, PollPolicy};
pub(crate) use render::print_yaml;
