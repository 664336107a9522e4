/// Input data model: ordered maps, keys and scalars
pub mod value;
