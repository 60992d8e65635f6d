pub mod categorydb;
pub mod chatdb;
pub mod db;
pub mod interactiondb;
pub mod jobdb;
pub mod userdb;
