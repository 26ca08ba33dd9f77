mod mod_delay;
mod stm;
