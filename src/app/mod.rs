pub mod discovery_use_case;
pub mod ports;
pub mod venue_use_case;
