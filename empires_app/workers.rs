mod economy_worker;

pub use economy_worker::EconomyWorker;
