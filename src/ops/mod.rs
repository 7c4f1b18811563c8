pub mod display;
pub mod replay;
pub mod todo_ops;
