pub mod bullet;
pub mod header;
pub mod see_also;
pub mod table;
pub mod table_sep;

pub use bullet::Bullet;
pub use header::Header;
pub use see_also::SeeAlso;
pub use table::{TableCells, TableRow};
pub use table_sep::TableSep;
