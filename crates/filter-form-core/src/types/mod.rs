pub mod filter_value;
pub mod input_definition;
pub mod input_option;
pub mod input_type;
pub mod input_value;

pub use filter_value::FilterValue;
pub use input_definition::InputDefinition;
pub use input_option::InputOption;
pub use input_type::InputType;
pub use input_value::InputValue;
