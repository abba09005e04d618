/// Major world cities: name, latitude, longitude, population.
pub(super) const WORLD_CITIES: &[(&str, f64, f64, u64)] = &[
    // North America
    ("New York, USA", 40.7128, -74.0060, 8_336_817),
    ("Los Angeles, USA", 34.0522, -118.2437, 3_979_576),
    ("Chicago, USA", 41.8781, -87.6298, 2_693_976),
    ("Houston, USA", 29.7604, -95.3698, 2_320_268),
    ("Phoenix, USA", 33.4484, -112.0740, 1_680_992),
    ("Philadelphia, USA", 39.9526, -75.1652, 1_584_064),
    ("San Antonio, USA", 29.4241, -98.4936, 1_547_253),
    ("San Diego, USA", 32.7157, -117.1611, 1_423_851),
    ("Dallas, USA", 32.7767, -96.7970, 1_343_573),
    ("San Jose, USA", 37.3382, -121.8863, 1_021_795),
    ("Seattle, USA", 47.6062, -122.3321, 753_675),
    ("Denver, USA", 39.7392, -104.9903, 715_522),
    ("Boston, USA", 42.3601, -71.0589, 692_600),
    ("Miami, USA", 25.7617, -80.1918, 467_963),
    ("Las Vegas, USA", 36.1699, -115.1398, 641_903),
    ("Toronto, Canada", 43.6532, -79.3832, 2_930_000),
    ("Montreal, Canada", 45.5017, -73.5673, 1_780_000),
    ("Vancouver, Canada", 49.2827, -123.1207, 675_218),
    ("Mexico City, Mexico", 19.4326, -99.1332, 9_209_944),
    ("Guadalajara, Mexico", 20.6597, -103.3496, 1_495_189),
    // South America
    ("São Paulo, Brazil", -23.5505, -46.6333, 12_325_232),
    ("Rio de Janeiro, Brazil", -22.9068, -43.1729, 6_748_000),
    ("Buenos Aires, Argentina", -34.6037, -58.3816, 3_075_646),
    ("Lima, Peru", -12.0464, -77.0428, 9_752_000),
    ("Bogotá, Colombia", 4.7110, -74.0721, 7_412_566),
    ("Santiago, Chile", -33.4489, -70.6693, 5_614_000),
    ("Caracas, Venezuela", 10.4806, -66.9036, 2_923_959),
    // Europe
    ("London, UK", 51.5074, -0.1278, 8_982_000),
    ("Paris, France", 48.8566, 2.3522, 2_161_000),
    ("Berlin, Germany", 52.5200, 13.4050, 3_769_495),
    ("Madrid, Spain", 40.4168, -3.7038, 3_223_334),
    ("Rome, Italy", 41.9028, 12.4964, 2_872_800),
    ("Amsterdam, Netherlands", 52.3676, 4.9041, 821_752),
    ("Vienna, Austria", 48.2082, 16.3738, 1_911_191),
    ("Warsaw, Poland", 52.2297, 21.0122, 1_790_658),
    ("Stockholm, Sweden", 59.3293, 18.0686, 975_551),
    ("Athens, Greece", 37.9838, 23.7275, 664_046),
    ("Moscow, Russia", 55.7558, 37.6173, 12_506_468),
    ("Istanbul, Turkey", 41.0082, 28.9784, 15_462_452),
    ("Kyiv, Ukraine", 50.4501, 30.5234, 2_967_360),
    // Asia
    ("Tokyo, Japan", 35.6762, 139.6503, 13_960_000),
    ("Beijing, China", 39.9042, 116.4074, 21_540_000),
    ("Shanghai, China", 31.2304, 121.4737, 27_058_480),
    ("Mumbai, India", 19.0760, 72.8777, 12_442_373),
    ("Delhi, India", 28.7041, 77.1025, 16_753_235),
    ("Bangalore, India", 12.9716, 77.5946, 8_443_675),
    ("Seoul, South Korea", 37.5665, 126.9780, 9_776_000),
    ("Bangkok, Thailand", 13.7563, 100.5018, 10_539_000),
    ("Singapore", 1.3521, 103.8198, 5_685_807),
    ("Manila, Philippines", 14.5995, 120.9842, 1_780_148),
    ("Jakarta, Indonesia", -6.2088, 106.8456, 10_562_088),
    ("Karachi, Pakistan", 24.8607, 67.0011, 14_910_352),
    ("Tehran, Iran", 35.6892, 51.3890, 8_693_706),
    ("Riyadh, Saudi Arabia", 24.7136, 46.6753, 7_676_654),
    ("Dubai, UAE", 25.2048, 55.2708, 3_331_420),
    ("Hong Kong", 22.3193, 114.1694, 7_496_981),
    // Africa
    ("Cairo, Egypt", 30.0444, 31.2357, 9_500_000),
    ("Lagos, Nigeria", 6.5244, 3.3792, 14_862_000),
    ("Johannesburg, South Africa", -26.2041, 28.0473, 5_635_127),
    ("Nairobi, Kenya", -1.2864, 36.8172, 4_397_073),
    ("Kinshasa, DR Congo", -4.4419, 15.2663, 14_342_000),
    ("Casablanca, Morocco", 33.5731, -7.5898, 3_359_818),
    ("Addis Ababa, Ethiopia", 9.0320, 38.7469, 3_352_000),
    // Oceania
    ("Sydney, Australia", -33.8688, 151.2093, 5_312_163),
    ("Melbourne, Australia", -37.8136, 144.9631, 5_078_193),
    ("Brisbane, Australia", -27.4698, 153.0251, 2_560_720),
    ("Perth, Australia", -31.9505, 115.8605, 2_125_114),
    ("Auckland, New Zealand", -36.8485, 174.7633, 1_571_718),
];
