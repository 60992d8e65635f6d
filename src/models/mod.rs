pub mod categorymodel;
pub mod chatmodel;
pub mod interactionmodel;
pub mod jobmodel;
pub mod usermodel;
