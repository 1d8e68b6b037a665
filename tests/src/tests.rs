#![cfg(test)]

mod helpers;

mod alu;
mod branch;
mod bus;
mod io;
mod progs;
