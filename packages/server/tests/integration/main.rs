mod common;
mod items;
mod meta;
mod postgres;
