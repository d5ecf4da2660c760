mod health;
mod products;
mod root;

pub use health::health_check;
pub use products::{
    DELETE_SUCCESS_MESSAGE, create_product, delete_product, get_product, list_products,
    product_stats, search_products, update_product,
};
pub use root::{WELCOME_MESSAGE, route_not_found, welcome};
