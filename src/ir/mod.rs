//! The toy three-address IR: values, operations, instructions, basic blocks,
//! the CFG they form, and the textual parser that builds one from a file.

pub mod block;
pub mod cfg;
pub mod instruction;
pub mod operation;
pub mod parser;
pub mod value;

pub use block::{BasicBlock, BlockId};
pub use cfg::Cfg;
pub use instruction::Instruction;
pub use operation::{Operation, OperationKind};
pub use value::Value;
