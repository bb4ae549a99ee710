pub mod declaration;
