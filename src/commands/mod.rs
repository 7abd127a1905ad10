mod listen;

pub use listen::cmd_listen;
