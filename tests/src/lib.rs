#![allow(dead_code)]


mod erc20;
mod storage;
