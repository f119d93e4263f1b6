mod test_abnormal_drop_triggers_leave;
