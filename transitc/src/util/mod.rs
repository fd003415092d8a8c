pub mod xml_ops;
