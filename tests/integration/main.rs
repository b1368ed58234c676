mod binary;
mod common;
mod dispatch;
