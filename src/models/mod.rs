mod category;
mod product;

pub use category::{Category, CategoryWithProducts, NewCategory, UpdateCategory};
pub use product::{NewProduct, Product, ProductWithCategory, UpdateProduct};
