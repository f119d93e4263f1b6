mod test_malformed_frames;
