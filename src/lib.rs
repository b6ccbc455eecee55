//! 会員・割引・注文のドメインを、二通りのDI設定（明示的な生成関数 / コンポーネントスキャン）で
//! 組み立てるデモ。
pub mod adapters;
pub mod application;
pub mod configuration;
pub mod container;
pub mod domain;
pub mod ports;
pub mod settings;
