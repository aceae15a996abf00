mod common;
mod reorder;
