pub mod machine;
pub mod pipeline;
pub mod script;
