use brk_derive::brk_error;

#[brk_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
