pub mod id_gen;
pub mod memory_store;
pub mod seed;
