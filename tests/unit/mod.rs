mod ticker_file;
