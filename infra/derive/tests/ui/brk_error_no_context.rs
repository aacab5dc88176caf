use brk_derive::brk_error;

#[brk_error]
pub enum DemoError {
    Io { source: std::io::Error },
}

fn main() {}
