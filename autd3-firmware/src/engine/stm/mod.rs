mod gain;
mod point;
