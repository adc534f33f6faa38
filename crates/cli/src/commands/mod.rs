pub(crate) mod load;
pub(crate) mod peek;
pub(crate) mod provision;
pub(crate) mod serve;
