pub mod db;
pub mod cart {
    pub mod entity;
    pub mod repository;
}
pub mod product {
    pub mod entity;
    pub mod repository;
}

#[cfg(test)]
mod test_db;
