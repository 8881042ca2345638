pub mod filter;
pub mod paginate;
pub mod venue;
