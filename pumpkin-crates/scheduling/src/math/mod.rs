mod num_ext;

pub(crate) use num_ext::NumExt;
