mod screening_pipeline;
mod telegram_delivery;
