pub mod case;
pub mod differential;
pub mod emg;
pub mod ncs;
